use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub product_id: i32,
    pub user_id: i32,
    pub user_name: &'a str,
    pub rating: i32,
    pub comment: &'a str,
    pub updated_at: NaiveDateTime,
}

impl Review {
    pub fn into_domain(self) -> DomainReview {
        DomainReview {
            id: self.id,
            product_id: self.product_id,
            user_id: self.user_id,
            user_name: self.user_name,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

impl From<Review> for DomainReview {
    fn from(value: Review) -> Self {
        value.into_domain()
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(value: &'a DomainNewReview) -> Self {
        Self {
            product_id: value.product_id,
            user_id: value.user_id,
            user_name: value.user_name.as_str(),
            rating: value.rating,
            comment: value.comment.as_str(),
            updated_at: value.updated_at,
        }
    }
}
