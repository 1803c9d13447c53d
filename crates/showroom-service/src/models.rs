use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

pub const DEFAULT_POST_AUTHOR: &str = "Showroom Editorial";

/// Declares a closed vocabulary stored as TEXT and exchanged as its variant
/// name in JSON.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
        )]
        #[diesel(sql_type = Text)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} value: {other}",
                        stringify!($name)
                    )),
                }
            }
        }

        impl ToSql<Text, Sqlite> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
                out.set_value(self.as_str());
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Sqlite> for $name {
            fn from_sql(value: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let raw = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
                Ok(raw.parse::<$name>()?)
            }
        }
    };
}

text_enum!(VehicleCategory { Car, Truck, Tractor });

text_enum!(
    #[derive(Default)]
    FuelType {
        Diesel,
        #[default]
        Gasoline,
        Hybrid,
        Electric,
    }
);

text_enum!(
    #[derive(Default)]
    Transmission {
        #[default]
        Manual,
        Automatic,
    }
);

text_enum!(
    #[derive(Default)]
    PostCategory {
        #[default]
        Advice,
        News,
        Maintenance,
        Events,
    }
);

/// Ordered image URLs, persisted as a JSON array in a TEXT column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[serde(transparent)]
#[diesel(sql_type = Text)]
pub struct ImageList(pub Vec<String>);

impl ToSql<Text, Sqlite> for ImageList {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(&self.0)?);
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for ImageList {
    fn from_sql(value: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        Ok(ImageList(serde_json::from_str(&raw)?))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::vehicles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub category: VehicleCategory,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub year: Option<i32>,
    pub odometer: Option<i64>,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub tonnage: Option<String>,
    pub description: Option<String>,
    pub images: ImageList,
    pub views: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct NewVehicle {
    pub category: VehicleCategory,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub year: Option<i32>,
    pub odometer: Option<i64>,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub tonnage: Option<String>,
    pub description: Option<String>,
    pub images: ImageList,
}

/// Partial vehicle update; `None` leaves the column unchanged.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct VehicleChanges {
    pub category: Option<VehicleCategory>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub year: Option<i32>,
    pub odometer: Option<i64>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub tonnage: Option<String>,
    pub description: Option<String>,
    pub images: Option<ImageList>,
}

impl VehicleChanges {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.brand.is_none()
            && self.model.is_none()
            && self.price.is_none()
            && self.year.is_none()
            && self.odometer.is_none()
            && self.fuel_type.is_none()
            && self.transmission.is_none()
            && self.tonnage.is_none()
            && self.description.is_none()
            && self.images.is_none()
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub image: String,
    pub category: PostCategory,
    pub author: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub image: String,
    pub category: PostCategory,
    pub author: String,
    pub published: bool,
}

/// Partial post update. `slug` is only ever set alongside `title`.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::posts)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub category: Option<PostCategory>,
    pub author: Option<String>,
    pub published: Option<bool>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.image.is_none()
            && self.category.is_none()
            && self.author.is_none()
            && self.published.is_none()
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i32,
    pub page_origin: String,
    pub read: bool,
    #[serde(rename = "date")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification {
    pub page_origin: String,
}
