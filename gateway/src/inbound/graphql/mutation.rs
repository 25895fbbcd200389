//! Mutation root. The engine executes top-level mutation fields serially.

use async_graphql::{Context, MaybeUndefined, Object};

use super::arguments::{invalid_user, parse_id};
use super::error::{directory, null_on_error};
use super::types::UserNode;
use crate::domain::{CompanyLink, Error, NewUser, UserPatch};

/// GraphQL `Mutation`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create a user. The backend assigns the id.
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        age: i32,
        company_id: Option<String>,
    ) -> Option<UserNode> {
        null_on_error(ctx, create_user(ctx, first_name, age, company_id).await)
    }

    /// Update the provided fields of a user.
    ///
    /// An explicit `companyId: null` unlinks the company; omitting it keeps
    /// the current link.
    async fn edit_user(
        &self,
        ctx: &Context<'_>,
        id: String,
        first_name: Option<String>,
        age: Option<i32>,
        company_id: MaybeUndefined<String>,
    ) -> Option<UserNode> {
        null_on_error(ctx, update_user(ctx, id, first_name, age, company_id).await)
    }

    /// Delete a user. Returns the removed record when the backend echoes it.
    async fn delete_user(&self, ctx: &Context<'_>, id: String) -> Option<UserNode> {
        null_on_error(ctx, remove_user(ctx, id).await)
    }
}

async fn create_user(
    ctx: &Context<'_>,
    first_name: String,
    age: i32,
    company_id: Option<String>,
) -> Result<Option<UserNode>, Error> {
    let new_user = new_user(first_name, age, company_id)?;
    let created = directory(ctx)?.add_user(&new_user).await?;
    Ok(Some(created.into()))
}

async fn update_user(
    ctx: &Context<'_>,
    id: String,
    first_name: Option<String>,
    age: Option<i32>,
    company_id: MaybeUndefined<String>,
) -> Result<Option<UserNode>, Error> {
    let id = parse_id(id)?;
    let patch = user_patch(first_name, age, company_id)?;
    let updated = directory(ctx)?.edit_user(&id, &patch).await?;
    Ok(Some(updated.into()))
}

async fn remove_user(ctx: &Context<'_>, id: String) -> Result<Option<UserNode>, Error> {
    let id = parse_id(id)?;
    let deleted = directory(ctx)?.delete_user(&id).await?;
    Ok(deleted.map(UserNode::from))
}

fn new_user(first_name: String, age: i32, company_id: Option<String>) -> Result<NewUser, Error> {
    let new_user = NewUser::new(first_name, age).map_err(|error| invalid_user(&error))?;
    match company_id {
        Some(company_id) => Ok(new_user.with_company(parse_id(company_id)?)),
        None => Ok(new_user),
    }
}

fn user_patch(
    first_name: Option<String>,
    age: Option<i32>,
    company_id: MaybeUndefined<String>,
) -> Result<UserPatch, Error> {
    let mut patch = UserPatch::default();
    if let Some(first_name) = first_name {
        patch = patch
            .with_first_name(first_name)
            .map_err(|error| invalid_user(&error))?;
    }
    if let Some(age) = age {
        patch = patch.with_age(age).map_err(|error| invalid_user(&error))?;
    }
    let link = match company_id {
        MaybeUndefined::Undefined => CompanyLink::Keep,
        MaybeUndefined::Null => CompanyLink::Unlink,
        MaybeUndefined::Value(company_id) => CompanyLink::Link(parse_id(company_id)?),
    };
    Ok(patch.with_company(link))
}
