//! Entry entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author: Option<String>,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub body_source: String,
    #[sea_orm(column_type = "Text")]
    pub html: String,
    pub published: DateTimeWithTimeZone,
    pub updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::Entry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author: model.author,
            title: model.title,
            slug: model.slug,
            body_source: model.body_source,
            html: model.html,
            published: model.published.into(),
            updated: model.updated.into(),
        }
    }
}

impl From<quill_core::domain::Entry> for ActiveModel {
    fn from(entry: quill_core::domain::Entry) -> Self {
        Self {
            id: Set(entry.id),
            author: Set(entry.author),
            title: Set(entry.title),
            slug: Set(entry.slug),
            body_source: Set(entry.body_source),
            html: Set(entry.html),
            published: Set(entry.published.into()),
            updated: Set(entry.updated.into()),
        }
    }
}
