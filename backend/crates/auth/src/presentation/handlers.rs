//! GraphQL resolvers for users and tokens

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::application::config::AuthConfig;
use crate::application::{SignUpInput, SignUpUseCase, TokenAuthInput, TokenAuthUseCase};
use crate::infra::store::AuthStore;
use crate::presentation::dto::{CreateUserInput, CreateUserPayload, ObtainTokenPayload};
use crate::presentation::guard::login_required;
use crate::presentation::node::UserNode;

#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// The user the bearer token was issued for
    async fn login_user(&self, ctx: &Context<'_>) -> Result<UserNode> {
        let user = login_required(ctx).map_err(|e| e.extend())?;
        Ok(UserNode(user.clone()))
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        input: CreateUserInput,
    ) -> Result<CreateUserPayload> {
        let store = ctx.data::<Arc<AuthStore>>()?;
        let config = ctx.data::<Arc<AuthConfig>>()?;

        let use_case = SignUpUseCase::new(store.clone(), config.clone());
        let user = use_case
            .execute(SignUpInput {
                user_name: input.username,
                email: input.email,
                password: input.password,
            })
            .await
            .map_err(|e| e.extend())?;

        Ok(CreateUserPayload {
            user: Some(UserNode(user)),
            client_mutation_id: input.client_mutation_id,
        })
    }

    /// Obtain a signed bearer token
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<ObtainTokenPayload> {
        let store = ctx.data::<Arc<AuthStore>>()?;
        let config = ctx.data::<Arc<AuthConfig>>()?;

        let use_case = TokenAuthUseCase::new(store.clone(), config.clone());
        let output = use_case
            .execute(TokenAuthInput {
                user_name: username,
                password,
            })
            .await
            .map_err(|e| e.extend())?;

        Ok(output.into())
    }
}
