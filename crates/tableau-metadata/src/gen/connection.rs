use serde::{Deserialize, Serialize};

use crate::querybuilder::GraphQLField;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl PageInfo {
    pub fn selection() -> GraphQLField {
        GraphQLField::new("pageInfo").fields([
            GraphQLField::new("hasNextPage"),
            GraphQLField::new("endCursor"),
        ])
    }
}

/// One page of a `*Connection` field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
    pub total_count: i64,
}

impl<T> Connection<T> {
    /// The envelope around `node_fields`: `nodes{..} pageInfo{..} totalCount`.
    pub fn selection(node_fields: Vec<GraphQLField>) -> Vec<GraphQLField> {
        vec![
            GraphQLField::new("nodes").fields(node_fields),
            PageInfo::selection(),
            GraphQLField::new("totalCount"),
        ]
    }

    /// The cursor to pass as `after` for the following page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.page_info.has_next_page {
            self.page_info.end_cursor.as_deref()
        } else {
            None
        }
    }
}
