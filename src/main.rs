use std::env;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use solestore::db::establish_connection_pool;
use solestore::repository::DieselRepository;
use solestore::routes::auth::{logout, me};
use solestore::routes::cart::{
    add_cart_item, clear_cart, remove_cart_item, show_cart, update_cart_item,
};
use solestore::routes::orders::{checkout_cart, my_orders};
use solestore::routes::products::{
    add_product, delete_product, get_product, list_products, popular_products,
    update_product_discount, update_product_sizes,
};
use solestore::routes::reviews::{product_reviews, write_review};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("shop.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(me)
                    .service(logout)
                    .service(popular_products)
                    .service(list_products)
                    .service(get_product)
                    .service(add_product)
                    .service(update_product_sizes)
                    .service(update_product_discount)
                    .service(delete_product)
                    .service(show_cart)
                    .service(add_cart_item)
                    .service(update_cart_item)
                    .service(clear_cart)
                    .service(remove_cart_item)
                    .service(checkout_cart)
                    .service(my_orders)
                    .service(product_reviews)
                    .service(write_review),
            )
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
