pub mod a001_vendor;
