//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldResult, RootNode};

use crate::domains::books::data::{BookData, BookInput, UpdateBookInput};
use crate::domains::books::edges::{mutation as book_mutations, query as book_queries};

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// Every book, oldest first
    async fn get_books(ctx: &GraphQLContext) -> FieldResult<Vec<BookData>> {
        book_queries::get_books(ctx).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Create a book (admin only)
    async fn create_book(ctx: &GraphQLContext, data: BookInput) -> FieldResult<BookData> {
        book_mutations::create_book(ctx, data).await
    }

    /// Update some or all fields of a book (admin only)
    async fn update_book(
        ctx: &GraphQLContext,
        id: i32,
        data: UpdateBookInput,
    ) -> FieldResult<BookData> {
        book_mutations::update_book(ctx, id, data).await
    }

    /// Delete a book, returning whether it existed (admin only)
    async fn delete_book(ctx: &GraphQLContext, id: i32) -> FieldResult<bool> {
        book_mutations::delete_book(ctx, id).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
