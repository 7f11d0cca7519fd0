pub mod ql;
