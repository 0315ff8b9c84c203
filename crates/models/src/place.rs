use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{day_opening, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "place")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub label: String,
    pub location: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { DayOpenings }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::DayOpenings => Entity::has_many(day_opening::Entity).into(),
        }
    }
}

impl Related<day_opening::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DayOpenings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_label(label: &str) -> Result<(), errors::ModelError> {
    if label.trim().is_empty() {
        return Err(errors::ModelError::Validation("label required".into()));
    }
    Ok(())
}

pub fn validate_location(location: &str) -> Result<(), errors::ModelError> {
    if location.trim().is_empty() {
        return Err(errors::ModelError::Validation("location required".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, label: &str, location: &str) -> Result<Model, errors::ModelError> {
    validate_label(label)?;
    validate_location(location)?;
    let am = ActiveModel {
        label: Set(label.to_string()),
        location: Set(location.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite label and location of an existing place.
pub async fn rename<C: ConnectionTrait>(db: &C, id: i64, label: &str, location: &str) -> Result<Option<Model>, errors::ModelError> {
    validate_label(label)?;
    validate_location(location)?;
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.label = Set(label.to_string());
    am.location = Set(location.to_string());
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}
