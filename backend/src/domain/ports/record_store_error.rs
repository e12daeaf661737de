//! Error type shared by the record repository ports.

use super::define_port_error;

define_port_error! {
    /// Failures raised by record store adapters.
    pub enum RecordStoreError {
        /// The store could not be reached or a connection could not be checked out.
        Connection { message: String } => "record store connection failed: {message}" as service_unavailable,
        /// A query or mutation failed during execution.
        Query { message: String } => "record store query failed: {message}" as internal,
        /// A unique key already exists. The constraint name stays out of the
        /// message so it never reaches a response body.
        Conflict { constraint: String } => "record already exists" as conflict,
        /// A referenced record does not exist.
        MissingReference { constraint: String } => "referenced record does not exist" as invalid_request,
    }
}
