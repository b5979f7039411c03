#[cfg(test)]
extern crate serial_test;

pub mod comment_tree;
pub mod comment_view;
