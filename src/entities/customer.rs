use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "customer")]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    /// Fixed-length alphabetic code, e.g. "ALFKI".
    #[sea_orm(primary_key, auto_increment = false)]
    #[validate(length(min = 1, max = 5, message = "Customer id must be between 1 and 5 characters"))]
    pub customer_id: String,

    #[validate(length(min = 1, max = 40, message = "Company name is required"))]
    pub company_name: String,

    pub contact_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
    #[sea_orm(has_one = "super::customer_setting::Entity")]
    CustomerSetting,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::customer_setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerSetting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
