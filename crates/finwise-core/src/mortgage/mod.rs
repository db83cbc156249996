pub mod amortization;

pub use amortization::{amortize, AddOnRates, MortgageInput, MortgageOutput, PaymentCadence};
