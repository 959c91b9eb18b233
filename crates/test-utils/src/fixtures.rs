//! Shared test fixtures for GraphQL schemas and documents.
//!
//! Use these for tests that don't need custom schemas. For tests where the
//! schema structure is important to the test case, prefer inline fixtures
//! to keep the test self-documenting.

/// Minimal schema with just Query and a User type.
pub const BASIC_SCHEMA: &str = r#"
type Query {
    user(id: ID!): User
    users: [User!]!
}

type User {
    id: ID!
    name: String
    email: String!
    age: Int
}
"#;

/// Schema with nested object types and every list/non-null combination.
///
/// Includes a User -> Post -> Comment chain, useful for testing:
/// - Link fields and their sub-declarations
/// - Wrapper fidelity (`[Post!]!` vs `[Post]`)
/// - Fragment spreads on nested types
pub const NESTED_SCHEMA: &str = r#"
type Query {
    user(id: ID!): User
    users: [User!]!
    post(id: ID!): Post
}

type Mutation {
    addComment(postId: ID!, text: String!): Comment!
}

type User {
    id: ID!
    name: String!
    email: String
    posts: [Post!]!
    drafts: [Post]
    friends: [User!]
}

type Post {
    id: ID!
    title: String!
    content: String
    author: User!
    comments: [Comment!]!
}

type Comment {
    id: ID!
    text: String!
    author: User!
}
"#;

/// Schema with interfaces and union types.
///
/// Useful for testing:
/// - Inline fragments on unions and interfaces
/// - `__typename` on abstract types
pub const INTERFACE_SCHEMA: &str = r#"
type Query {
    node(id: ID!): Node
    animal: Animal
    animals: [Animal!]!
}

interface Node {
    id: ID!
}

type Cat implements Node {
    id: ID!
    meow: String!
    lives: Int!
}

type Dog implements Node {
    id: ID!
    bark: String!
    goodBoy: Boolean
}

union Animal = Cat | Dog
"#;

/// Schema with input types, enums and custom scalars.
///
/// Useful for testing:
/// - Variables types
/// - Scalar mapping
pub const INPUT_SCHEMA: &str = r#"
scalar DateTime

type Query {
    user(id: ID!): User
    users(filter: UserFilter, sort: SortOrder, first: Int): [User!]!
}

type Mutation {
    createUser(input: CreateUserInput!): User!
}

type Subscription {
    userCreated: User!
}

type User {
    id: ID!
    name: String!
    status: UserStatus!
    createdAt: DateTime!
}

input CreateUserInput {
    name: String!
    status: UserStatus
}

input UserFilter {
    nameContains: String
    status: UserStatus
    ids: [ID!]
}

enum UserStatus {
    ACTIVE
    INACTIVE
}

enum SortOrder {
    ASC
    DESC
}
"#;

/// Simple valid query for basic tests.
pub const BASIC_QUERY: &str = r#"
query GetUser($id: ID!) {
    user(id: $id) {
        id
        name
        email
    }
}
"#;

/// Query with fragment spread.
pub const QUERY_WITH_FRAGMENT: &str = r#"
query GetUser($id: ID!) {
    user(id: $id) {
        ...UserFields
    }
}

fragment UserFields on User {
    id
    name
    email
}
"#;
