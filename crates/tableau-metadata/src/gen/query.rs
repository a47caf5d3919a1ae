use std::pin::Pin;

use futures::{stream, Stream, TryStreamExt};

use crate::core::config::DEFAULT_PAGE_SIZE;
use crate::core::graphql_client::DynGraphQLClient;
use crate::errors::MetadataError;
use crate::gen::connection::Connection;
use crate::gen::inputs::{
    CustomSqlTableFilter, DatabaseTableFilter, EmbeddedDatasourceFilter, FieldFilter,
    PublishedDatasourceFilter, SheetFilter, WorkbookFilter,
};
use crate::operations::custom_sql_tables::CustomSqlTable;
use crate::operations::database_tables::DatabaseTable;
use crate::operations::embedded_datasources::EmbeddedDatasource;
use crate::operations::fields::FieldLineage;
use crate::operations::published_datasources::PublishedDatasource;
use crate::operations::sheets::Sheet;
use crate::operations::workbooks::Workbook;
use crate::operations::{
    ArgsOf, ConnectionArgs, ConnectionQuery, GetCustomSqlTables, GetDatabaseTables,
    GetEmbeddedDatasources, GetFields, GetPublishedDatasources, GetSheets, GetWorkbooks,
};
use crate::querybuilder::{query, Selection};

pub type MetadataStream<T> = Pin<Box<dyn Stream<Item = Result<T, MetadataError>> + Send>>;

/// Root of the metadata API. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Query {
    pub selection: Selection,
    pub graphql_client: DynGraphQLClient,
    pub page_size: i64,
}

enum PageState {
    Next(Option<String>),
    Stalled(String),
    Done,
}

impl Query {
    pub fn with_client(graphql_client: DynGraphQLClient, page_size: i64) -> Self {
        Self {
            selection: query(),
            graphql_client,
            page_size: if page_size > 0 {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
        }
    }

    /// Starts a hand-built selection from the query root.
    pub fn select(&self, name: &str) -> Selection {
        self.selection.select(name)
    }

    pub async fn connection<Q>(&self, args: ArgsOf<Q>) -> Result<Connection<Q::Node>, MetadataError>
    where
        Q: ConnectionQuery,
    {
        Q::connection_selection(&args)
            .execute_field(self.graphql_client.clone(), Q::CONNECTION_FIELD)
            .await
    }

    pub async fn list<Q>(&self, filter: Option<Q::Filter>) -> Result<Vec<Q::Node>, MetadataError>
    where
        Q: ConnectionQuery,
    {
        Q::list_selection(filter.as_ref())
            .execute(self.graphql_client.clone())
            .await
    }

    /// Every page of `Q`, in order, `page_size` nodes at a time.
    pub fn pages<Q>(
        &self,
        filter: Option<Q::Filter>,
        order_by: Option<Q::SortOrder>,
    ) -> MetadataStream<Connection<Q::Node>>
    where
        Q: ConnectionQuery,
    {
        let client = self.graphql_client.clone();
        let page_size = self.page_size;

        let pages = stream::try_unfold(PageState::Next(None), move |state| {
            let client = client.clone();
            let filter = filter.clone();
            let order_by = order_by.clone();

            async move {
                let after = match state {
                    PageState::Done => return Ok(None),
                    PageState::Stalled(reason) => return Err(MetadataError::Pagination(reason)),
                    PageState::Next(after) => after,
                };

                let args = ConnectionArgs {
                    first: Some(page_size),
                    after: after.clone(),
                    filter,
                    order_by,
                };
                let page: Connection<Q::Node> = Q::connection_selection(&args)
                    .execute_field(client, Q::CONNECTION_FIELD)
                    .await?;

                tracing::debug!(
                    operation = Q::OPERATION_NAME,
                    after = after.as_deref().unwrap_or(""),
                    count = page.nodes.len(),
                    total = page.total_count,
                    "fetched page"
                );

                let next = match (page.page_info.has_next_page, &page.page_info.end_cursor) {
                    (false, _) => PageState::Done,
                    (true, None) => PageState::Stalled(format!(
                        "{} reported another page without an end cursor",
                        Q::CONNECTION_FIELD
                    )),
                    (true, Some(cursor)) if after.as_ref() == Some(cursor) => {
                        PageState::Stalled(format!(
                            "{} returned cursor {} twice",
                            Q::CONNECTION_FIELD,
                            cursor
                        ))
                    }
                    (true, Some(cursor)) => PageState::Next(Some(cursor.clone())),
                };

                Ok(Some((page, next)))
            }
        });

        Box::pin(pages)
    }

    /// Every node of `Q`, following cursors until the last page.
    pub fn paginate<Q>(
        &self,
        filter: Option<Q::Filter>,
        order_by: Option<Q::SortOrder>,
    ) -> MetadataStream<Q::Node>
    where
        Q: ConnectionQuery,
    {
        let nodes = self
            .pages::<Q>(filter, order_by)
            .map_ok(|page| stream::iter(page.nodes.into_iter().map(Ok)))
            .try_flatten();

        Box::pin(nodes)
    }

    pub async fn fetch_all<Q>(
        &self,
        filter: Option<Q::Filter>,
        order_by: Option<Q::SortOrder>,
    ) -> Result<Vec<Q::Node>, MetadataError>
    where
        Q: ConnectionQuery,
    {
        self.paginate::<Q>(filter, order_by).try_collect().await
    }

    /// Runs a hand-built selection and returns the raw `data` object.
    pub async fn execute_raw(&self, selection: &Selection) -> Result<serde_json::Value, MetadataError> {
        let document = selection.build()?;
        let variables = selection.variable_values()?;

        tracing::trace!(query = document.as_str(), "tableau-metadata-query");

        let data = self
            .graphql_client
            .query(&document, variables)
            .await
            .map_err(MetadataError::Query)?;

        Ok(data.unwrap_or(serde_json::Value::Null))
    }

    pub async fn workbooks_connection(
        &self,
        args: ArgsOf<GetWorkbooks>,
    ) -> Result<Connection<Workbook>, MetadataError> {
        self.connection::<GetWorkbooks>(args).await
    }

    pub async fn workbooks(&self, filter: Option<WorkbookFilter>) -> Result<Vec<Workbook>, MetadataError> {
        self.list::<GetWorkbooks>(filter).await
    }

    pub async fn sheets_connection(
        &self,
        args: ArgsOf<GetSheets>,
    ) -> Result<Connection<Sheet>, MetadataError> {
        self.connection::<GetSheets>(args).await
    }

    pub async fn sheets(&self, filter: Option<SheetFilter>) -> Result<Vec<Sheet>, MetadataError> {
        self.list::<GetSheets>(filter).await
    }

    pub async fn published_datasources_connection(
        &self,
        args: ArgsOf<GetPublishedDatasources>,
    ) -> Result<Connection<PublishedDatasource>, MetadataError> {
        self.connection::<GetPublishedDatasources>(args).await
    }

    pub async fn published_datasources(
        &self,
        filter: Option<PublishedDatasourceFilter>,
    ) -> Result<Vec<PublishedDatasource>, MetadataError> {
        self.list::<GetPublishedDatasources>(filter).await
    }

    pub async fn embedded_datasources_connection(
        &self,
        args: ArgsOf<GetEmbeddedDatasources>,
    ) -> Result<Connection<EmbeddedDatasource>, MetadataError> {
        self.connection::<GetEmbeddedDatasources>(args).await
    }

    pub async fn embedded_datasources(
        &self,
        filter: Option<EmbeddedDatasourceFilter>,
    ) -> Result<Vec<EmbeddedDatasource>, MetadataError> {
        self.list::<GetEmbeddedDatasources>(filter).await
    }

    pub async fn fields_connection(
        &self,
        args: ArgsOf<GetFields>,
    ) -> Result<Connection<FieldLineage>, MetadataError> {
        self.connection::<GetFields>(args).await
    }

    pub async fn fields(&self, filter: Option<FieldFilter>) -> Result<Vec<FieldLineage>, MetadataError> {
        self.list::<GetFields>(filter).await
    }

    pub async fn custom_sql_tables_connection(
        &self,
        args: ArgsOf<GetCustomSqlTables>,
    ) -> Result<Connection<CustomSqlTable>, MetadataError> {
        self.connection::<GetCustomSqlTables>(args).await
    }

    pub async fn custom_sql_tables(
        &self,
        filter: Option<CustomSqlTableFilter>,
    ) -> Result<Vec<CustomSqlTable>, MetadataError> {
        self.list::<GetCustomSqlTables>(filter).await
    }

    pub async fn database_tables_connection(
        &self,
        args: ArgsOf<GetDatabaseTables>,
    ) -> Result<Connection<DatabaseTable>, MetadataError> {
        self.connection::<GetDatabaseTables>(args).await
    }

    pub async fn database_tables(
        &self,
        filter: Option<DatabaseTableFilter>,
    ) -> Result<Vec<DatabaseTable>, MetadataError> {
        self.list::<GetDatabaseTables>(filter).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::Query;
    use crate::core::graphql_client::{GraphQLClient, GraphQLError};
    use crate::errors::MetadataError;
    use crate::gen::fields::WorkbookFields;
    use crate::gen::inputs::DatabaseTableFilterBuilder;
    use crate::operations::{ConnectionArgs, GetDatabaseTables};

    /// Replays canned `data` payloads and records every request.
    struct ScriptedClient {
        responses: Mutex<VecDeque<Result<Option<Value>, GraphQLError>>>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().map(|r| Ok(Some(r))).collect()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(String, Value)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphQLClient for ScriptedClient {
        async fn query(
            &self,
            query: &str,
            variables: Value,
        ) -> Result<Option<Value>, GraphQLError> {
            self.requests
                .lock()
                .unwrap()
                .push((query.to_string(), variables));

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GraphQLError::HttpError("no more responses".into())))
        }
    }

    fn page(ids: &[&str], has_next: bool, cursor: Option<&str>, total: i64) -> Value {
        json!({
            "databaseTablesConnection": {
                "nodes": ids
                    .iter()
                    .map(|id| json!({"id": id, "isEmbedded": false, "columns": []}))
                    .collect::<Vec<_>>(),
                "pageInfo": {"hasNextPage": has_next, "endCursor": cursor},
                "totalCount": total
            }
        })
    }

    #[tokio::test]
    async fn test_paginate_follows_cursors() {
        let client = ScriptedClient::new(vec![
            page(&["t1", "t2"], true, Some("c2"), 5),
            page(&["t3", "t4"], true, Some("c4"), 5),
            page(&["t5"], false, Some("c5"), 5),
        ]);
        let query = Query::with_client(client.clone(), 2);

        let tables = query
            .fetch_all::<GetDatabaseTables>(None, None)
            .await
            .unwrap();

        assert_eq!(
            tables.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["t1", "t2", "t3", "t4", "t5"]
        );

        let variables = client
            .requests()
            .into_iter()
            .map(|(_, v)| v)
            .collect::<Vec<_>>();
        assert_eq!(
            variables,
            vec![
                json!({"first": 2, "after": null}),
                json!({"first": 2, "after": "c2"}),
                json!({"first": 2, "after": "c4"}),
            ]
        );
    }

    #[tokio::test]
    async fn test_paginate_missing_cursor() {
        let client = ScriptedClient::new(vec![page(&["t1"], true, None, 2)]);
        let query = Query::with_client(client.clone(), 1);

        let mut nodes = query.paginate::<GetDatabaseTables>(None, None);

        assert_eq!(nodes.next().await.unwrap().unwrap().id, "t1");
        assert!(matches!(
            nodes.next().await,
            Some(Err(MetadataError::Pagination(_)))
        ));
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_paginate_repeated_cursor() {
        let client = ScriptedClient::new(vec![
            page(&["t1"], true, Some("c1"), 3),
            page(&["t2"], true, Some("c1"), 3),
        ]);
        let query = Query::with_client(client.clone(), 1);

        let res = query.fetch_all::<GetDatabaseTables>(None, None).await;

        assert!(matches!(res, Err(MetadataError::Pagination(_))));
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_paginate_propagates_transport_errors() {
        let client = ScriptedClient::new(vec![page(&["t1"], true, Some("c1"), 3)]);
        let query = Query::with_client(client, 1);

        let res = query.fetch_all::<GetDatabaseTables>(None, None).await;

        assert!(matches!(res, Err(MetadataError::Query(_))));
    }

    #[tokio::test]
    async fn test_connection_sends_filter_inline() {
        let client = ScriptedClient::new(vec![page(&["t1"], false, None, 1)]);
        let query = Query::with_client(client.clone(), 100);

        let filter = DatabaseTableFilterBuilder::default()
            .id_within(vec!["t1".to_string()])
            .build()
            .unwrap();
        let page = query
            .database_tables_connection(ConnectionArgs::default().first(10).filter(filter))
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.next_cursor(), None);

        let (document, variables) = client.requests().remove(0);
        assert_eq!(
            document,
            r#"query GetDatabaseTables($first: Int, $after: String){databaseTablesConnection(first:$first, after:$after, filter:{idWithin:["t1"]}){nodes{id isEmbedded columns{remoteType name}} pageInfo{hasNextPage endCursor} totalCount}}"#
        );
        assert_eq!(variables, json!({"first": 10, "after": null}));
    }

    #[tokio::test]
    async fn test_list() {
        let client = ScriptedClient::new(vec![json!({
            "databaseTables": [
                {"id": "t1", "isEmbedded": true, "columns": [{"remoteType": "STR", "name": "a"}]}
            ]
        })]);
        let query = Query::with_client(client.clone(), 100);

        let tables = query.list::<GetDatabaseTables>(None).await.unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].is_embedded, Some(true));
        assert_eq!(
            client.requests()[0].0,
            "query GetDatabaseTables{databaseTables{id isEmbedded columns{remoteType name}}}"
        );
    }

    #[tokio::test]
    async fn test_shortcut_uses_list_field() {
        let client = ScriptedClient::new(vec![json!({"databaseTables": []})]);
        let query = Query::with_client(client.clone(), 2);

        let filter = DatabaseTableFilterBuilder::default()
            .is_embedded(true)
            .build()
            .unwrap();
        let tables = query.database_tables(Some(filter)).await.unwrap();

        assert!(tables.is_empty());
        assert_eq!(
            client.requests(),
            vec![(
                "query GetDatabaseTables{databaseTables(filter:{isEmbedded:true}){id isEmbedded columns{remoteType name}}}".to_string(),
                json!({})
            )]
        );
    }

    #[tokio::test]
    async fn test_execute_raw() {
        let client = ScriptedClient::new(vec![json!({"first": [{"label": "Sales"}]})]);
        let query = Query::with_client(client.clone(), 100);

        let selection = query
            .selection
            .select_with_alias("first", "workbooks")
            .fields([WorkbookFields::name().alias("label")]);
        let data = query.execute_raw(&selection).await.unwrap();

        assert_eq!(data, json!({"first": [{"label": "Sales"}]}));
        assert_eq!(
            client.requests()[0].0,
            "query{first:workbooks{label:name}}"
        );
    }

    #[test]
    fn test_non_positive_page_size_falls_back() {
        let query = Query::with_client(ScriptedClient::new(vec![]), 0);
        assert_eq!(query.page_size, 100);
    }
}
