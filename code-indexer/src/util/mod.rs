pub mod fs_scan;
