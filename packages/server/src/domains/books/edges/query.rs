use juniper::{FieldResult, IntoFieldError};
use tracing::info;

use crate::common::AccessPolicy;
use crate::domains::books::data::BookData;
use crate::server::graphql::context::GraphQLContext;

/// List every book; any authenticated caller
pub async fn get_books(ctx: &GraphQLContext) -> FieldResult<Vec<BookData>> {
    info!("getBooks");

    ctx.require(AccessPolicy::Authenticated)
        .map_err(IntoFieldError::into_field_error)?;

    let books = ctx
        .books
        .find_all()
        .await
        .map_err(IntoFieldError::into_field_error)?;

    Ok(books.into_iter().map(BookData::from).collect())
}
