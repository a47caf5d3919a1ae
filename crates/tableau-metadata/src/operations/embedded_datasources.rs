use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gen::fields::{typename, DatasourceFields, EmbeddedDatasourceFields, SheetFields};
use crate::gen::inputs::{EmbeddedDatasourceFilter, EmbeddedDatasourceSortOrder};
use crate::operations::common::{
    datasource_fields, upstream_tables, workbook_ref, DatasourceFieldSummary, NamedRef,
    UpstreamTable, WorkbookRef,
};
use crate::operations::ConnectionQuery;
use crate::querybuilder::GraphQLField;

pub struct GetEmbeddedDatasources;

impl ConnectionQuery for GetEmbeddedDatasources {
    const OPERATION_NAME: &'static str = "GetEmbeddedDatasources";
    const CONNECTION_FIELD: &'static str = "embeddedDatasourcesConnection";
    const LIST_FIELD: &'static str = "embeddedDatasources";
    const NODE_TYPE: &'static str = "EmbeddedDatasource";

    type Filter = EmbeddedDatasourceFilter;
    type SortOrder = EmbeddedDatasourceSortOrder;
    type Node = EmbeddedDatasource;

    fn node_fields() -> Vec<GraphQLField> {
        vec![
            typename(),
            DatasourceFields::id(),
            DatasourceFields::name(),
            DatasourceFields::has_extracts(),
            DatasourceFields::extract_last_refresh_time(),
            DatasourceFields::extract_last_incremental_update_time(),
            DatasourceFields::extract_last_update_time(),
            DatasourceFields::downstream_sheets([SheetFields::name(), SheetFields::id()]),
            upstream_tables("upstreamTables", true),
            datasource_fields(),
            EmbeddedDatasourceFields::upstream_datasources([
                DatasourceFields::id(),
                DatasourceFields::name(),
            ]),
            workbook_ref(true),
        ]
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedDatasource {
    pub id: String,
    pub name: Option<String>,
    pub has_extracts: Option<bool>,
    pub extract_last_refresh_time: Option<DateTime<Utc>>,
    pub extract_last_incremental_update_time: Option<DateTime<Utc>>,
    pub extract_last_update_time: Option<DateTime<Utc>>,
    pub downstream_sheets: Vec<NamedRef>,
    pub upstream_tables: Vec<UpstreamTable>,
    pub fields: Vec<DatasourceFieldSummary>,
    pub upstream_datasources: Vec<NamedRef>,
    pub workbook: Option<WorkbookRef>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{EmbeddedDatasource, GetEmbeddedDatasources};
    use crate::operations::ConnectionQuery;

    #[test]
    fn test_workbook_selects_owner() {
        let fields = GetEmbeddedDatasources::node_fields();
        let workbook = fields.iter().find(|f| f.name() == "workbook").unwrap();

        assert_eq!(
            workbook.build().unwrap(),
            "workbook{id name projectName luid owner{username}}"
        );
    }

    #[test]
    fn test_decode_embedded_datasource() {
        let ds: EmbeddedDatasource = serde_json::from_str(
            r#"{
                "__typename": "EmbeddedDatasource",
                "id": "eds1",
                "name": "Sales (local)",
                "hasExtracts": false,
                "extractLastRefreshTime": null,
                "extractLastIncrementalUpdateTime": null,
                "extractLastUpdateTime": null,
                "downstreamSheets": [{"name": "Overview", "id": "s1"}],
                "upstreamTables": [],
                "fields": [],
                "upstreamDatasources": [{"id": "pds1", "name": "Orders"}],
                "workbook": {
                    "id": "wb1",
                    "name": "Regional Sales",
                    "projectName": "Finance",
                    "luid": "9e3f6a1c-1111-4222-8333-444455556666",
                    "owner": {"username": "jdoe"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(ds.downstream_sheets[0].name.as_deref(), Some("Overview"));
        assert_eq!(ds.upstream_datasources[0].name.as_deref(), Some("Orders"));
        assert_eq!(
            ds.workbook.unwrap().owner.unwrap().username.as_deref(),
            Some("jdoe")
        );
    }
}
