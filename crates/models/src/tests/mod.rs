
/// CRUD operations against PostgreSQL; skipped without a database
pub mod crud_tests;
