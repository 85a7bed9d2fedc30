pub mod balance;
pub mod topup_payment;
