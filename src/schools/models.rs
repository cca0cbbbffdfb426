use std::fs;

use diesel::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{schema::schools, storage::ImageUpload};

pub static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10,15}$").expect("contact regex"));

pub static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email regex")
});

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schools)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub image: Option<String>,
    pub email_id: String,
}

/// Row projection returned by the listing.
#[derive(Queryable, Selectable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schools)]
pub struct SchoolCard {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub image: Option<String>,
}

/// A decoded school submission. Fields absent from the request stay empty.
///
/// The validation rules are applied by the submission page only, the JSON
/// endpoint stores whatever it receives.
#[derive(Validate, Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolForm {
    #[validate(length(min = 1, message = "School Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(
        length(min = 1, message = "Contact Number is required"),
        regex(path = "CONTACT_RE", message = "Contact must be 10-15 digits only")
    )]
    pub contact: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        regex(path = "EMAIL_RE", message = "Invalid email address format")
    )]
    pub email_id: String,

    #[validate(required(message = "School Image is required"))]
    pub image: Option<ImageUpload>,
}

impl SchoolForm {
    pub fn to_new_school(&self, image: Option<String>) -> NewSchool {
        NewSchool {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            contact: self.contact.clone(),
            image,
            email_id: self.email_id.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateSchool {
    name: String,
    address: String,
    city: String,
    state: String,
    contact: String,
    email_id: String,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<fs::File>,
}
