//! Query root.

use async_graphql::{Context, Object};

use super::arguments::require_id;
use super::error::{directory, null_on_error};
use super::types::{CompanyNode, UserNode};
use crate::domain::Error;

/// GraphQL `RootQueryType`.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

#[Object(name = "RootQueryType")]
impl QueryRoot {
    /// Fetch one user by id.
    async fn user(&self, ctx: &Context<'_>, id: Option<String>) -> Option<UserNode> {
        null_on_error(ctx, fetch_user(ctx, id).await)
    }

    /// Fetch one company by id.
    async fn company(&self, ctx: &Context<'_>, id: Option<String>) -> Option<CompanyNode> {
        null_on_error(ctx, fetch_company(ctx, id).await)
    }
}

async fn fetch_user(ctx: &Context<'_>, id: Option<String>) -> Result<Option<UserNode>, Error> {
    let id = require_id(id)?;
    let user = directory(ctx)?.user(&id).await?;
    Ok(Some(user.into()))
}

async fn fetch_company(
    ctx: &Context<'_>,
    id: Option<String>,
) -> Result<Option<CompanyNode>, Error> {
    let id = require_id(id)?;
    let company = directory(ctx)?.company(&id).await?;
    Ok(Some(company.into()))
}
