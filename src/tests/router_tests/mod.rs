mod admin_tests;
mod blog_tests;
mod leads_tests;
mod listings_tests;
mod locations_tests;
