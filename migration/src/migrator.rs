use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510160001_create_teachers::Migration),
            Box::new(migrations::m202510160002_create_reports::Migration),
        ]
    }
}
