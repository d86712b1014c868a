//! Behavioral checks over the public signing surface, driven the way the
//! façade drives it: config in, request settings out.

use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use s3kit::{Config, Part, Range, SignatureVersion, Storage, Vendor};

fn config(vendor: Vendor, signature: SignatureVersion) -> Config {
    serde_json::from_str::<Config>(
        r#"{
            "access": "ak",
            "secret": "sk",
            "region": "cn-beijing-6",
            "bucket": "mail",
            "domain": "mail.endpoint.example.com"
        }"#,
    )
    .map(|mut c| {
        c.vendor = Some(vendor);
        c.signature = signature;
        c
    })
    .unwrap()
}

#[test]
fn test_storage_requires_vendor() {
    let mut cfg = config(Vendor::Ks3, SignatureVersion::V2);
    cfg.vendor = None;
    assert!(Storage::new(&cfg).is_err());
}

#[test]
fn test_nine_operations_have_expected_shape() {
    for signature in [SignatureVersion::V2, SignatureVersion::V4] {
        for vendor in [
            Vendor::Ks3,
            Vendor::Obs,
            Vendor::Aws,
            Vendor::Minio,
            Vendor::Oss,
        ] {
            let storage = Storage::new(&config(vendor, signature)).unwrap();

            let head = storage.head_object("k");
            assert_eq!((head.method, head.status), (Method::HEAD, StatusCode::OK));

            let get = storage.get_object("k", None);
            assert_eq!((get.method, get.status), (Method::GET, StatusCode::OK));

            let ranged = storage.get_object("k", Some(Range { start: 0, end: 9 }));
            assert_eq!(ranged.status, StatusCode::PARTIAL_CONTENT);
            assert_eq!(ranged.headers["range"], "bytes=0-9");

            let put = storage.put_object("k", None);
            assert_eq!((put.method, put.status), (Method::PUT, StatusCode::OK));
            // An empty configured content type falls back to a binary stream.
            assert_eq!(put.headers["content-type"], "application/octet-stream");

            let delete = storage.delete_object("k");
            assert_eq!(
                (delete.method, delete.status),
                (Method::DELETE, StatusCode::NO_CONTENT)
            );

            let init = storage.initiate_multipart_upload("k");
            assert_eq!(init.method, Method::POST);
            assert!(init.url.ends_with("/k?uploads=1"));

            let part = storage.upload_part("k", "upload-1", 3, None);
            assert!(part.url.ends_with("/k?partNumber=3&uploadId=upload-1"));

            let complete = storage.complete_multipart_upload("k", "upload-1");
            assert_eq!(complete.method, Method::POST);
            assert!(complete.url.ends_with("/k?uploadId=upload-1"));

            let abort = storage.abort_multipart_upload("k", "upload-1");
            assert_eq!(abort.status, StatusCode::NO_CONTENT);

            let link = storage.get_object_link("k", 600);
            assert!(link.starts_with("https://mail.endpoint.example.com/k?"));
        }
    }
}

#[test]
fn test_authorization_prefix_tracks_vendor_code() {
    let cases = [
        (Vendor::Ks3, "KSS ak:"),
        (Vendor::Obs, "OBS ak:"),
        (Vendor::Aws, "AWS ak:"),
        (Vendor::Minio, "AWS ak:"),
    ];
    for (vendor, prefix) in cases {
        let storage = Storage::new(&config(vendor, SignatureVersion::V2)).unwrap();
        let set = storage.head_object("k");
        assert!(
            set.headers["authorization"].starts_with(prefix),
            "{vendor}: {}",
            set.headers["authorization"]
        );
    }
}

#[test]
fn test_v4_authorization_carries_scope() {
    let storage = Storage::new(&config(Vendor::Ks3, SignatureVersion::V4)).unwrap();
    let set = storage.put_object("k", None);

    let authorization = &set.headers["authorization"];
    assert!(authorization.starts_with("KSS4-HMAC-SHA256 Credential=ak/"));
    assert!(authorization.contains("/cn-beijing-6/ks3/kss4_request"));
    assert!(authorization.contains("SignedHeaders="));
    assert_eq!(set.headers["x-kss-content-sha256"], "UNSIGNED-PAYLOAD");
}

#[test]
fn test_prefix_applies_to_every_operation() {
    let mut cfg = config(Vendor::Minio, SignatureVersion::V4);
    cfg.prefix = "attachments/".to_string();
    let storage = Storage::new(&cfg).unwrap();

    for url in [
        storage.head_object("k").url,
        storage.get_object("k", None).url,
        storage.put_object("k", None).url,
        storage.delete_object("k").url,
        storage.get_object_link("k", 60),
    ] {
        assert!(
            url.starts_with("https://mail.endpoint.example.com/attachments/k"),
            "{url}"
        );
    }
}

#[test]
fn test_part_serializes_like_the_vendor_expects() {
    let part = Part {
        part_number: 1,
        etag: "abc".to_string(),
    };
    assert_eq!(
        quick_xml::se::to_string(&part).unwrap(),
        "<Part><PartNumber>1</PartNumber><ETag>abc</ETag></Part>"
    );
}
