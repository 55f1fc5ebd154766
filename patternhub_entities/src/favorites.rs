use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub pattern_id: i64,
    pub session_id: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::patterns::Entity",
        from = "Column::PatternId",
        to = "super::patterns::Column::Id",
        on_delete = "Cascade"
    )]
    Pattern,
}

impl Related<super::patterns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pattern.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
