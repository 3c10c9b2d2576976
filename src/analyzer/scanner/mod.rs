pub mod package_scanner;

pub use package_scanner::PackageScanner;
