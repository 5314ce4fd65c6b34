use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Table, Tenant};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableResolution {
    pub tenant: Tenant,
    pub table: Table,
}
