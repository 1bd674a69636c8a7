pub mod year_2025;
