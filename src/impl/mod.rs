// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod chat_service_datasource;
        pub(crate) mod extraction_service_datasource;
        pub(crate) mod statement_json_datasource;
        #[cfg(test)]
        pub(crate) mod test_server;
    }
    pub(crate) mod models {
        pub(crate) mod amount_model;
        pub(crate) mod document_upload_model;
        pub(crate) mod service_response_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod statement_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod flow_graph;
        pub(crate) mod handlers;
        pub(crate) mod line_item;
        pub(crate) mod metrics;
        pub(crate) mod statement;
    }
    pub(crate) mod logic {
        pub(crate) mod category_flattener;
        pub(crate) mod graph_builder;
        pub(crate) mod metrics_engine;
        pub(crate) mod query_responder;
    }
    pub(crate) mod repositories {
        pub(crate) mod statement_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod query_usecase;
        pub(crate) mod statement_flow_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod palette;
    pub(crate) mod render_json;
    pub(crate) mod summary_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::flow_graph::*;
        pub use crate::domain::entities::handlers::*;
        pub use crate::domain::entities::line_item::{
            FlattenedBalanceSheet, FlattenedIncomeStatement, LineItem, LineItemType, Subcategory,
        };
        pub use crate::domain::entities::metrics::*;
        pub use crate::domain::entities::statement::*;
    }

    pub mod palette {
        pub use crate::presentation::palette::*;
    }
}
