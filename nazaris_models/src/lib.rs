pub mod contact;
pub mod email_address;
pub mod phone;
pub mod site;
pub mod work_type;
