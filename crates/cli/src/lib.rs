pub mod graph_file;
pub mod report;

pub use self::{
    graph_file::{Graph, GraphFile, GraphFileError},
    report::{Query, QueryParseError, Report},
};
