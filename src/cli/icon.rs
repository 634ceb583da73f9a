use crate::providers::HttpIconResolver;

pub async fn run(resolver: &HttpIconResolver, currency: &str) {
    println!("{}", resolver.resolve(currency).await);
}
