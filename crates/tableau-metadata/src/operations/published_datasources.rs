use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gen::fields::{typename, DatasourceFields, PublishedDatasourceFields};
use crate::gen::inputs::{PublishedDatasourceFilter, PublishedDatasourceSortOrder};
use crate::operations::common::{
    datasource_fields, owner, tags, upstream_tables, DatasourceFieldSummary, Owner, TagRef,
    UpstreamTable,
};
use crate::operations::ConnectionQuery;
use crate::querybuilder::GraphQLField;

pub struct GetPublishedDatasources;

impl ConnectionQuery for GetPublishedDatasources {
    const OPERATION_NAME: &'static str = "GetPublishedDatasources";
    const CONNECTION_FIELD: &'static str = "publishedDatasourcesConnection";
    const LIST_FIELD: &'static str = "publishedDatasources";
    const NODE_TYPE: &'static str = "PublishedDatasource";

    type Filter = PublishedDatasourceFilter;
    type SortOrder = PublishedDatasourceSortOrder;
    type Node = PublishedDatasource;

    fn node_fields() -> Vec<GraphQLField> {
        vec![
            typename(),
            DatasourceFields::id(),
            DatasourceFields::name(),
            PublishedDatasourceFields::luid(),
            DatasourceFields::has_extracts(),
            DatasourceFields::extract_last_refresh_time(),
            DatasourceFields::extract_last_incremental_update_time(),
            DatasourceFields::extract_last_update_time(),
            upstream_tables("upstreamTables", true),
            datasource_fields(),
            owner(),
            PublishedDatasourceFields::description(),
            PublishedDatasourceFields::uri(),
            PublishedDatasourceFields::project_name(),
            tags(),
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishedDatasource {
    pub id: String,
    pub name: Option<String>,
    pub luid: String,
    pub has_extracts: Option<bool>,
    pub extract_last_refresh_time: Option<DateTime<Utc>>,
    pub extract_last_incremental_update_time: Option<DateTime<Utc>>,
    pub extract_last_update_time: Option<DateTime<Utc>>,
    pub upstream_tables: Vec<UpstreamTable>,
    pub fields: Vec<DatasourceFieldSummary>,
    pub owner: Owner,
    pub description: Option<String>,
    pub uri: Option<String>,
    pub project_name: Option<String>,
    pub tags: Vec<TagRef>,
}
