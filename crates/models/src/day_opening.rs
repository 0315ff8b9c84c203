use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, place};

/// One opening interval of a place on one weekday.
/// `day_of_week` holds the upper-case weekday name, times are `HH:mm`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "day_opening")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub place_id: i64,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub opening_type: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Place }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Place => Entity::belongs_to(place::Entity)
                .from(Column::PlaceId)
                .to(place::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<place::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Place.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Row to insert; the id is assigned by the database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDayOpening {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub opening_type: Option<String>,
}

pub async fn insert_many<C: ConnectionTrait>(db: &C, place_id: i64, rows: &[NewDayOpening]) -> Result<Vec<Model>, errors::ModelError> {
    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        if row.day_of_week.trim().is_empty() {
            return Err(errors::ModelError::Validation("day_of_week required".into()));
        }
        let am = ActiveModel {
            place_id: Set(place_id),
            day_of_week: Set(row.day_of_week.clone()),
            start_time: Set(row.start_time.clone()),
            end_time: Set(row.end_time.clone()),
            opening_type: Set(row.opening_type.clone()),
            ..Default::default()
        };
        created.push(am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?);
    }
    Ok(created)
}

/// All openings of the given places, in insertion order.
pub async fn find_by_places<C: ConnectionTrait>(db: &C, place_ids: &[i64]) -> Result<Vec<Model>, errors::ModelError> {
    if place_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = Entity::find()
        .filter(Column::PlaceId.is_in(place_ids.iter().copied()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn delete_by_place<C: ConnectionTrait>(db: &C, place_id: i64) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many().filter(Column::PlaceId.eq(place_id)).exec(db).await?;
    Ok(res.rows_affected)
}
