pub mod d400_vendor_dashboard;
