pub mod comment_aggregates;
