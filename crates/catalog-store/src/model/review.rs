use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A review score in `1..=5`.
///
/// Construction is the only place the range is checked; a [`Review`] holding
/// a `Rating` never re-validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    /// [`CatalogError::InvalidRating`] when `value` is outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, CatalogError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CatalogError::InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer's review of one product.
///
/// Reviews are owned by exactly one [`Product`](crate::model::Product).
/// `customer_id` is not required to reference a registered customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    customer_id: String,
    rating: Rating,
    comment: String,
}

impl Review {
    /// Creates a new Review.
    ///
    /// # Arguments
    /// * `customer_id` - Author of the review
    /// * `rating` - Score in `1..=5`
    /// * `comment` - Free text comment
    pub fn new(customer_id: impl Into<String>, rating: Rating, comment: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            rating,
            comment: comment.into(),
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_rating(&mut self, rating: Rating) {
        self.rating = rating;
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).map(Rating::value), Ok(1));
        assert_eq!(Rating::new(5).map(Rating::value), Ok(5));
        assert_eq!(Rating::new(6), Err(CatalogError::InvalidRating(6)));
        assert!(Rating::try_from(3u8).is_ok());
    }
}
