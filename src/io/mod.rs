pub mod row_io;
