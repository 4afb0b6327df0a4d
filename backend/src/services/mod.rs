pub mod proofs;
pub mod registrations;
