pub mod nic;
pub mod packet;

#[cfg(test)]
mod test;
