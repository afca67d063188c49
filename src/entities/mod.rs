pub mod category;
pub mod customer;
pub mod customer_setting;
pub mod employee;
pub mod employee_territory;
pub mod order;
pub mod order_detail;
pub mod product;
pub mod territory;
