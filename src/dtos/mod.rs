pub mod payment_result_dtos;
