use crate::util::report;
use http_signing::algorithm::Algorithm;

pub fn do_it(header: &'static str) -> miette::Result<()> {
    let parsed = match http_signing::header::parse(header) {
        Ok(parsed) => parsed,
        Err(err) => return Err(miette::Error::new(err).with_source_code(header)),
    };

    report(true, "Header is valid!");
    println!("keyId: {}", parsed.key_id);

    if let Some(algorithm) = parsed.algorithm {
        println!("algorithm: {algorithm}");

        if let Err(err) = algorithm.parse::<Algorithm>() {
            report(false, err);
        }
    }

    println!("headers: {}", parsed.headers.collect::<Vec<_>>().join(" "));
    println!("signature: {}", parsed.signature);

    Ok(())
}
