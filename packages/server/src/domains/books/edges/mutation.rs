//! Book mutations. All of them are admin-only, and access is checked before
//! the input is validated.

use juniper::{FieldResult, IntoFieldError};
use tracing::info;

use crate::common::AccessPolicy;
use crate::domains::books::data::{BookData, BookInput, UpdateBookInput};
use crate::domains::books::models::BookId;
use crate::domains::books::BookError;
use crate::server::graphql::context::GraphQLContext;

pub async fn create_book(ctx: &GraphQLContext, data: BookInput) -> FieldResult<BookData> {
    let identity = ctx
        .require(AccessPolicy::Admin)
        .map_err(IntoFieldError::into_field_error)?;
    info!(sub = ?identity.subject(), "createBook");

    let input = data
        .validate()
        .map_err(|violations| BookError::Validation(violations).into_field_error())?;

    let book = ctx
        .books
        .create(input)
        .await
        .map_err(IntoFieldError::into_field_error)?;

    Ok(BookData::from(book))
}

/// Fields left out of `data` keep their stored value
pub async fn update_book(
    ctx: &GraphQLContext,
    id: i32,
    data: UpdateBookInput,
) -> FieldResult<BookData> {
    let identity = ctx
        .require(AccessPolicy::Admin)
        .map_err(IntoFieldError::into_field_error)?;
    info!(sub = ?identity.subject(), book_id = id, "updateBook");

    let changes = data
        .validate()
        .map_err(|violations| BookError::Validation(violations).into_field_error())?;

    let book = ctx
        .books
        .update(BookId::new(id), changes)
        .await
        .map_err(IntoFieldError::into_field_error)?;

    Ok(BookData::from(book))
}

/// False when no book had this id
pub async fn delete_book(ctx: &GraphQLContext, id: i32) -> FieldResult<bool> {
    let identity = ctx
        .require(AccessPolicy::Admin)
        .map_err(IntoFieldError::into_field_error)?;
    info!(sub = ?identity.subject(), book_id = id, "deleteBook");

    ctx.books
        .delete(BookId::new(id))
        .await
        .map_err(IntoFieldError::into_field_error)
}
