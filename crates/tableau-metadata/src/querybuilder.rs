use std::{ops::Add, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use crate::core::graphql_client::DynGraphQLClient;
use crate::errors::{MetadataError, UnpackError};

pub fn query() -> Selection {
    Selection::default()
}

#[derive(Clone, Debug, PartialEq)]
enum Argument {
    Literal(String),
    Variable(String),
    Invalid(String),
}

impl Argument {
    fn literal<S>(value: S) -> Self
    where
        S: Serialize,
    {
        match serde_graphql_input::to_string_pretty(&value) {
            Ok(val) => Argument::Literal(val),
            Err(e) => Argument::Invalid(e.to_string()),
        }
    }

    fn render(&self, name: &str) -> Result<String, MetadataError> {
        match self {
            Argument::Literal(val) => Ok(format!("{name}:{val}")),
            Argument::Variable(var) => Ok(format!("{name}:${var}")),
            Argument::Invalid(e) => Err(MetadataError::Serialize(eyre::eyre!(
                "argument {name}: {e}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Arguments(Vec<(String, Argument)>);

impl Arguments {
    fn set(&mut self, name: &str, arg: Argument) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = arg,
            None => self.0.push((name.to_string(), arg)),
        }
    }

    fn render(&self) -> Result<Option<String>, MetadataError> {
        if self.0.is_empty() {
            return Ok(None);
        }

        let mut actualargs = Vec::new();
        for (name, arg) in self.0.iter() {
            actualargs.push(arg.render(name)?);
        }

        Ok(Some(format!("({})", actualargs.join(", "))))
    }
}

/// A single field in a selection set, with its alias, arguments and
/// sub-selection. Builders are consumed and returned so they chain.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLField {
    name: String,
    alias: Option<String>,
    args: Arguments,
    fields: Vec<GraphQLField>,
    fragments: Vec<InlineFragment>,
}

#[derive(Clone, Debug, PartialEq)]
struct InlineFragment {
    type_condition: String,
    fields: Vec<GraphQLField>,
}

impl GraphQLField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            args: Arguments::default(),
            fields: Vec::new(),
            fragments: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn arg<S>(mut self, name: &str, value: S) -> Self
    where
        S: Serialize,
    {
        self.args.set(name, Argument::literal(value));
        self
    }

    pub fn arg_var(mut self, name: &str, variable: &str) -> Self {
        self.args.set(name, Argument::Variable(variable.to_string()));
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = GraphQLField>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Adds an inline fragment, `... on <type_condition>{...}`.
    pub fn on(
        mut self,
        type_condition: impl Into<String>,
        fields: impl IntoIterator<Item = GraphQLField>,
    ) -> Self {
        self.fragments.push(InlineFragment {
            type_condition: type_condition.into(),
            fields: fields.into_iter().collect(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The key this field appears under in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn subfields(&self) -> &[GraphQLField] {
        &self.fields
    }

    /// Inline fragments in selection order, as `(type_condition, fields)`.
    /// A type condition may appear more than once.
    pub fn fragments(&self) -> impl Iterator<Item = (&str, &[GraphQLField])> {
        self.fragments
            .iter()
            .map(|f| (f.type_condition.as_str(), f.fields.as_slice()))
    }

    pub fn build(&self) -> Result<String, MetadataError> {
        let mut out = String::new();
        self.render(&mut out)?;
        Ok(out)
    }

    fn render(&self, out: &mut String) -> Result<(), MetadataError> {
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push(':');
        }
        out.push_str(&self.name);
        if let Some(args) = self.args.render()? {
            out.push_str(&args);
        }
        render_selection_set(&self.fields, &self.fragments, out)
    }
}

fn render_selection_set(
    fields: &[GraphQLField],
    fragments: &[InlineFragment],
    out: &mut String,
) -> Result<(), MetadataError> {
    if fields.is_empty() && fragments.is_empty() {
        return Ok(());
    }

    out.push('{');
    let mut first = true;
    for field in fields {
        if !first {
            out.push(' ');
        }
        first = false;
        field.render(out)?;
    }
    for fragment in fragments {
        if !first {
            out.push(' ');
        }
        first = false;
        out.push_str("... on ");
        out.push_str(&fragment.type_condition);
        render_selection_set(&fragment.fields, &[], out)?;
    }
    out.push('}');

    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
struct VariableDefinition {
    name: String,
    graphql_type: String,
    value: Result<serde_json::Value, String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    name: Option<String>,
    alias: Option<String>,
    args: Arguments,
    fields: Vec<GraphQLField>,
    fragments: Vec<InlineFragment>,

    operation_name: Option<String>,
    variables: Vec<VariableDefinition>,

    prev: Option<Arc<Selection>>,
}

impl Selection {
    pub fn select_with_alias(&self, alias: &str, name: &str) -> Selection {
        Self {
            name: Some(name.to_string()),
            alias: Some(alias.to_string()),
            args: Arguments::default(),
            fields: Vec::new(),
            fragments: Vec::new(),
            operation_name: self.operation_name.clone(),
            variables: self.variables.clone(),
            prev: Some(Arc::new(self.clone())),
        }
    }

    pub fn select(&self, name: &str) -> Selection {
        Self {
            name: Some(name.to_string()),
            alias: None,
            args: Arguments::default(),
            fields: Vec::new(),
            fragments: Vec::new(),
            operation_name: self.operation_name.clone(),
            variables: self.variables.clone(),
            prev: Some(Arc::new(self.clone())),
        }
    }

    pub fn operation(&self, name: &str) -> Selection {
        let mut s = self.clone();
        s.operation_name = Some(name.to_string());
        s
    }

    /// Declares `$name: graphql_type` on the operation and records the value
    /// sent alongside the document.
    pub fn variable<S>(&self, name: &str, graphql_type: &str, value: S) -> Selection
    where
        S: Serialize,
    {
        let mut s = self.clone();

        let value = serde_json::to_value(&value).map_err(|e| e.to_string());
        let def = VariableDefinition {
            name: name.to_string(),
            graphql_type: graphql_type.to_string(),
            value,
        };

        match s.variables.iter_mut().find(|v| v.name == name) {
            Some(existing) => *existing = def,
            None => s.variables.push(def),
        }

        s
    }

    pub fn arg<S>(&self, name: &str, value: S) -> Selection
    where
        S: Serialize,
    {
        let mut s = self.clone();
        s.args.set(name, Argument::literal(value));
        s
    }

    pub fn arg_var(&self, name: &str, variable: &str) -> Selection {
        let mut s = self.clone();
        s.args.set(name, Argument::Variable(variable.to_string()));
        s
    }

    pub fn fields(&self, fields: impl IntoIterator<Item = GraphQLField>) -> Selection {
        let mut s = self.clone();
        s.fields.extend(fields);
        s
    }

    pub fn on(
        &self,
        type_condition: &str,
        fields: impl IntoIterator<Item = GraphQLField>,
    ) -> Selection {
        let mut s = self.clone();
        s.fragments.push(InlineFragment {
            type_condition: type_condition.to_string(),
            fields: fields.into_iter().collect(),
        });
        s
    }

    pub fn build(&self) -> Result<String, MetadataError> {
        let mut head = "query".to_string();
        if let Some(name) = &self.operation_name {
            head.push(' ');
            head.push_str(name);
        }
        if !self.variables.is_empty() {
            let defs = self
                .variables
                .iter()
                .map(|v| format!("${}: {}", v.name, v.graphql_type))
                .collect::<Vec<_>>();
            head.push_str(&format!("({})", defs.join(", ")));
        }

        let mut fields = vec![head];

        for sel in self.path() {
            if let Some(mut query) = sel.name.clone() {
                if let Some(args) = sel.args.render()? {
                    query = query.add(&args);
                }

                if let Some(alias) = sel.alias {
                    query = format!("{}:{}", alias, query);
                }

                fields.push(query);
            }
        }

        let mut leaf = String::new();
        render_selection_set(&self.fields, &self.fragments, &mut leaf)?;

        Ok(fields.join("{") + &leaf + &"}".repeat(fields.len() - 1))
    }

    pub fn variable_values(&self) -> Result<serde_json::Value, MetadataError> {
        let mut values = serde_json::Map::new();
        for var in &self.variables {
            let value = var.value.clone().map_err(|e| {
                MetadataError::Serialize(eyre::eyre!("variable ${}: {}", var.name, e))
            })?;
            values.insert(var.name.clone(), value);
        }

        Ok(serde_json::Value::Object(values))
    }

    pub async fn execute<D>(&self, gql_client: DynGraphQLClient) -> Result<D, MetadataError>
    where
        D: DeserializeOwned,
    {
        let query = self.build()?;
        let variables = self.variable_values()?;

        tracing::trace!(query = query.as_str(), "tableau-metadata-query");

        let resp: Option<serde_json::Value> = match gql_client.query(&query, variables).await {
            Ok(r) => r,
            Err(e) => return Err(MetadataError::Query(e)),
        };

        self.unpack_resp(resp)
    }

    /// Like `execute`, but takes `data[key]` from the response instead of
    /// walking the selection path. `key` is the alias or field name.
    pub async fn execute_field<D>(
        &self,
        gql_client: DynGraphQLClient,
        key: &str,
    ) -> Result<D, MetadataError>
    where
        D: DeserializeOwned,
    {
        let query = self.build()?;
        let variables = self.variable_values()?;

        tracing::trace!(query = query.as_str(), "tableau-metadata-query");

        let resp = gql_client
            .query(&query, variables)
            .await
            .map_err(MetadataError::Query)?;

        take_field(resp, key)
    }

    fn path(&self) -> Vec<Selection> {
        let mut selections: Vec<Selection> = vec![];
        let mut cur = self;

        while cur.prev.is_some() {
            selections.push(cur.clone());

            if let Some(prev) = cur.prev.as_ref() {
                cur = prev;
            }
        }

        selections.reverse();
        selections
    }

    pub(crate) fn unpack_resp<D>(&self, resp: Option<serde_json::Value>) -> Result<D, MetadataError>
    where
        D: DeserializeOwned,
    {
        let keys = self
            .path()
            .into_iter()
            .filter_map(|sel| sel.alias.or(sel.name))
            .collect::<Vec<_>>();

        self.unpack_resp_value(resp.unwrap_or(serde_json::Value::Null), &keys)
    }

    fn unpack_resp_value<D>(&self, r: serde_json::Value, keys: &[String]) -> Result<D, MetadataError>
    where
        D: DeserializeOwned,
    {
        if let Some((key, rest)) = keys.split_first() {
            match r {
                serde_json::Value::Object(mut o) => {
                    if o.len() > 1 {
                        return Err(MetadataError::Unpack(UnpackError::TooManyNestedObjects));
                    }

                    let next = o
                        .remove(key)
                        .ok_or_else(|| UnpackError::MissingField(key.clone()))
                        .map_err(MetadataError::Unpack)?;
                    return self.unpack_resp_value(next, rest);
                }
                // a null parent short-circuits the remaining path
                serde_json::Value::Null => {}
                _ => {
                    return Err(MetadataError::Unpack(UnpackError::MissingField(
                        key.clone(),
                    )))
                }
            }
        }

        serde_json::from_value::<D>(r)
            .map_err(UnpackError::Deserialize)
            .map_err(MetadataError::Unpack)
    }
}

fn take_field<D>(resp: Option<serde_json::Value>, key: &str) -> Result<D, MetadataError>
where
    D: DeserializeOwned,
{
    let value = match resp {
        Some(serde_json::Value::Object(mut data)) => data.remove(key),
        _ => None,
    }
    .ok_or_else(|| MetadataError::Unpack(UnpackError::MissingField(key.to_string())))?;

    serde_json::from_value::<D>(value)
        .map_err(UnpackError::Deserialize)
        .map_err(MetadataError::Unpack)
}
