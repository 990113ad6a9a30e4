//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. `favorites`
//! is created by the migrations but not read by any adapter yet, so it has no
//! definition here.

diesel::table! {
    /// Registered user accounts. `email` is unique and stored normalised.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        photo -> Nullable<Varchar>,
        password_hash -> Varchar,
        is_active -> Bool,
        is_staff -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tourist points of interest.
    tourist_spots (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
        city -> Varchar,
        /// Latitude in micro-degrees.
        latitude_micro -> Int4,
        /// Longitude in micro-degrees.
        longitude_micro -> Int4,
        /// One of the `Category::as_str` keys.
        category -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Images owned by a tourist spot; deleted with it.
    tourist_spot_images (id) {
        id -> Uuid,
        tourist_spot_id -> Uuid,
        image -> Varchar,
        caption -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tourist_spot_images -> tourist_spots (tourist_spot_id));
diesel::allow_tables_to_appear_in_same_query!(tourist_spots, tourist_spot_images);
