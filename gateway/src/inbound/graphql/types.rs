//! GraphQL object types wrapping the domain records.
//!
//! Relation fields are nullable: a backend failure inside `User.company` or
//! `Company.users` becomes a field error while sibling fields keep their data.

use async_graphql::{Context, Object};

use super::error::{directory, null_on_error};
use crate::domain::{Company, Error, User};

/// GraphQL `User`.
#[derive(Debug, Clone)]
pub struct UserNode(User);

impl From<User> for UserNode {
    fn from(user: User) -> Self {
        Self(user)
    }
}

#[Object(name = "User")]
impl UserNode {
    async fn id(&self) -> &str {
        self.0.id().as_str()
    }

    async fn first_name(&self) -> &str {
        self.0.first_name()
    }

    async fn age(&self) -> i32 {
        self.0.age()
    }

    /// Identifier of the owning company, null when the user has none.
    async fn company_id(&self) -> Option<&str> {
        self.0.company_id().map(|id| id.as_str())
    }

    /// Owning company. Resolves to null without a backend call when the user
    /// has no `companyId`.
    async fn company(&self, ctx: &Context<'_>) -> Option<CompanyNode> {
        null_on_error(ctx, owning_company(ctx, &self.0).await)
    }
}

/// GraphQL `Company`.
#[derive(Debug, Clone)]
pub struct CompanyNode(Company);

impl From<Company> for CompanyNode {
    fn from(company: Company) -> Self {
        Self(company)
    }
}

#[Object(name = "Company")]
impl CompanyNode {
    async fn id(&self) -> &str {
        self.0.id().as_str()
    }

    async fn name(&self) -> &str {
        self.0.name()
    }

    async fn description(&self) -> Option<&str> {
        self.0.description()
    }

    /// Members of the company, in backend order.
    async fn users(&self, ctx: &Context<'_>) -> Option<Vec<UserNode>> {
        null_on_error(ctx, members(ctx, &self.0).await)
    }
}

async fn owning_company(ctx: &Context<'_>, user: &User) -> Result<Option<CompanyNode>, Error> {
    let company = directory(ctx)?.user_company(user).await?;
    Ok(company.map(CompanyNode::from))
}

async fn members(ctx: &Context<'_>, company: &Company) -> Result<Option<Vec<UserNode>>, Error> {
    let users = directory(ctx)?.company_users(company).await?;
    Ok(Some(users.into_iter().map(UserNode::from).collect()))
}
