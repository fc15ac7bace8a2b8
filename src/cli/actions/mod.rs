pub mod login;

#[derive(Debug)]
pub enum Action {
    Login { phone: Option<String> },
}
