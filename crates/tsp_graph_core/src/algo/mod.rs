pub mod exact;
pub mod mst;
pub mod preorder;
pub mod queue;
pub mod state;
pub mod two_opt;
