mod test_utils;

mod appointment_test;
mod availability_test;
mod middleware_test;
