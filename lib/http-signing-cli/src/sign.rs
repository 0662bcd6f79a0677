use crate::args::{RequestArgs, SignArgs};
use http_signing::crypto::{parse, RingKeyPair, RingSigner};
use miette::{IntoDiagnostic, WrapErr};

pub fn signing_string(args: &RequestArgs) -> miette::Result<()> {
    let headers = args.header_map();
    let request = args
        .request_builder(headers.as_ref())
        .key_id("")
        .key(())
        .build()
        .into_diagnostic()?;

    let signing_string = http_signing::signature_string::construct(&request)?;
    println!("{signing_string}");

    Ok(())
}

pub async fn sign(args: &SignArgs) -> miette::Result<()> {
    let pem = std::fs::read_to_string(&args.private_key)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", args.private_key.display()))?;
    let private_key = parse::private_key(&pem)?;
    let key_pair = RingKeyPair::new(private_key, args.key_algorithm());

    let headers = args.request.header_map();
    let mut builder = args
        .request
        .request_builder(headers.as_ref())
        .key_id(&args.key_id)
        .key(&key_pair)
        .salt_length(args.salt_length);

    if let Some(algorithm) = args.algorithm.as_deref() {
        builder = builder.algorithm(algorithm);
    }

    let request = builder.build().into_diagnostic()?;
    let header_value = http_signing::sign(&request, &RingSigner).await?;
    println!("{header_value}");

    Ok(())
}
