use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");

// Parsing-related.
define_client_error!(InvalidStatementJson, "Invalid financial statement JSON.");
define_client_error!(MissingField, "Missing required field '{path}'.", { path: &str });
define_client_error!(
    InvalidFieldType,
    "Invalid format for '{path}', expected {expected}.",
    { path: &str, expected: &str }
);
define_client_error!(
    InvalidAmount,
    "Invalid amount for '{path}': '{value}'.",
    { path: &str, value: &str }
);
define_client_error!(InvalidStatementKind, "Unknown statement kind: '{kind}'.", { kind: &str });
define_client_error!(InvalidConfig, "Invalid configuration (invalid RON format).");
define_client_error!(InvalidUpload, "Invalid upload: {details}.", { details: &str });

// Graph-related.
define_client_error!(
    DuplicateNode,
    "Duplicate flow node '{name}' (from '{path}'). Node names must be unique within a statement.",
    { name: &str, path: &str }
);
define_internal_error!(
    UnknownNode,
    "Flow link references node '{key}', which was never inserted.",
    { key: &str }
);

// Metrics-related.
define_client_error!(
    UndefinedRatio,
    "Ratio '{ratio}' is undefined: {reason}.",
    { ratio: &str, reason: &str }
);

// External services.
define_client_error!(UpstreamRequestFailed, "Request to {service} failed.", { service: &str });
define_client_error!(
    UpstreamErrorResponse,
    "{service} returned an error (status {status}): {message}.",
    { service: &str, status: u16, message: &str }
);
define_client_error!(
    InvalidUpstreamResponse,
    "Invalid response received from {service}.",
    { service: &str }
);
