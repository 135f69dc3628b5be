mod grammar;
mod printing;
