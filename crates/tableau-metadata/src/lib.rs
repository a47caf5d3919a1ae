//! Typed client for the Tableau Metadata API.

pub mod core;
pub mod errors;
pub mod gen;
pub mod logging;
pub mod operations;
pub mod querybuilder;

mod client;

pub use crate::core::config::{AuthMethod, Config};
pub use crate::core::graphql_client::{DynGraphQLClient, GraphQLClient};
pub use client::*;
pub use gen::connection::{Connection, PageInfo};
pub use gen::enums::*;
pub use gen::inputs::*;
pub use gen::query::{MetadataStream, Query};
pub use operations::{ArgsOf, ConnectionArgs, ConnectionQuery};
pub use querybuilder::{query, GraphQLField, Selection};
