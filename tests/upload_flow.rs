//! 图片批次与视频上传的端到端流程（通过假协作方驱动）

mod common;

use serde_json::json;

use comfy_oss::codec::ImageFormat;
use comfy_oss::node::{get_node, MediaInput, OutputValue};
use comfy_oss::upload::{ImageUploadRequest, UploadPolicy, Uploader, VideoUploadRequest};

use common::*;

#[tokio::test]
async fn test_three_frame_batch_urls_in_order() {
    let store = RecordingStore::new();
    let encoder = FakeEncoder::new();
    let tokens = SeqTokens::new();
    let uploader = Uploader::new(&store, &encoder, &tokens);

    let req = ImageUploadRequest {
        prefix: "comfyui".to_string(),
        folder: "".to_string(),
        format: ImageFormat::Jpeg,
        quality: 90,
        include_date: false,
    };

    let joined = uploader
        .upload_images(&frames(3), &credentials(), &req)
        .await;

    // 时间戳段为空时保留两个相邻下划线
    assert_eq!(
        joined,
        "https://demo-bucket.oss-cn-hangzhou.aliyuncs.com/comfyui__0_00000000.jpg, \
         https://demo-bucket.oss-cn-hangzhou.aliyuncs.com/comfyui__1_00000001.jpg, \
         https://demo-bucket.oss-cn-hangzhou.aliyuncs.com/comfyui__2_00000002.jpg"
    );

    let calls = store.calls();
    assert_eq!(calls.len(), 3);
    for (index, call) in calls.iter().enumerate() {
        match call {
            StoreCall::Put {
                key, content_type, ..
            } => {
                assert_eq!(key, &format!("comfyui__{}_0000000{}.jpg", index, index));
                assert_eq!(content_type.as_deref(), Some("image/jpeg"));
            }
            other => panic!("意外的调用: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_batch_keeps_going_after_encode_failure() {
    let store = RecordingStore::new();
    let encoder = FakeEncoder {
        fail_at: Some(1),
        ..FakeEncoder::new()
    };
    let tokens = SeqTokens::new();
    let uploader = Uploader::new(&store, &encoder, &tokens);

    let req = ImageUploadRequest {
        prefix: "comfyui".to_string(),
        folder: "".to_string(),
        format: ImageFormat::Png,
        quality: 90,
        include_date: false,
    };

    let joined = uploader
        .upload_images(&frames(3), &credentials(), &req)
        .await;
    let fragments: Vec<&str> = joined.split(", ").collect();

    assert_eq!(fragments.len(), 3);
    assert!(fragments[0].starts_with("https://"));
    assert!(fragments[1].starts_with("上传失败 comfyui__1_00000001.png"));
    assert!(fragments[1].contains("编码失败"));
    assert!(fragments[2].starts_with("https://"));

    // 失败的帧没有发起存储调用，其余两帧正常上传
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn test_batch_storage_failure_message_contains_key() {
    let store = RecordingStore {
        fail_put_at: Some(0),
        ..RecordingStore::new()
    };
    let encoder = FakeEncoder::new();
    let tokens = SeqTokens::new();
    let uploader = Uploader::new(&store, &encoder, &tokens);

    let req = ImageUploadRequest {
        prefix: "comfyui".to_string(),
        folder: "out".to_string(),
        format: ImageFormat::Jpeg,
        quality: 90,
        include_date: false,
    };

    let joined = uploader
        .upload_images(&frames(1), &credentials(), &req)
        .await;

    assert!(joined.starts_with("上传失败 out/comfyui__0_00000000.jpg"));
    assert!(joined.contains("模拟存储失败"));
}

#[tokio::test]
async fn test_video_permanent_url() {
    let store = RecordingStore::new();
    let encoder = FakeEncoder::new();
    let tokens = SeqTokens::new();
    let uploader = Uploader::new(&store, &encoder, &tokens);

    let req = VideoUploadRequest {
        prefix: "comfyui_video".to_string(),
        folder: "video".to_string(),
        include_date: false,
        custom_filename: None,
        content_type: None,
    };
    let policy = UploadPolicy {
        use_temporary_url: false,
        expiration_hours: 24,
        multipart_threshold_mb: None,
    };

    let video = FakeVideo { size: 1024 };
    let outcome = uploader
        .upload_video(&video, &credentials(), &req, &policy)
        .await
        .unwrap();

    assert_eq!(
        outcome.url,
        "https://demo-bucket.oss-cn-hangzhou.aliyuncs.com/video/comfyui_video_00000000.mp4"
    );
    assert_eq!(outcome.stats.total_bytes, 1024);
    assert_eq!(outcome.stats.parts, 0);

    match &store.calls()[0] {
        StoreCall::Put {
            key, content_type, ..
        } => {
            assert_eq!(key, "video/comfyui_video_00000000.mp4");
            assert_eq!(content_type.as_deref(), Some("video/mp4"));
        }
        other => panic!("意外的调用: {:?}", other),
    }
}

#[tokio::test]
async fn test_video_temporary_url_scheme_normalized() {
    let store = RecordingStore {
        sign_scheme_http: true,
        ..RecordingStore::new()
    };
    let encoder = FakeEncoder::new();
    let tokens = SeqTokens::new();
    let uploader = Uploader::new(&store, &encoder, &tokens);

    let req = VideoUploadRequest {
        custom_filename: Some("final_cut".to_string()),
        include_date: false,
        ..VideoUploadRequest::default()
    };
    let policy = UploadPolicy {
        use_temporary_url: true,
        expiration_hours: 48,
        multipart_threshold_mb: None,
    };

    let video = FakeVideo { size: 64 };
    let outcome = uploader
        .upload_video(&video, &credentials(), &req, &policy)
        .await
        .unwrap();

    // 签名方返回的 http 协议被改写为 https，其余内容不变
    assert!(outcome.url.starts_with(
        "https://demo-bucket.oss-cn-hangzhou.aliyuncs.com/video/final_cut.mp4?Expires="
    ));

    let calls = store.calls();
    assert!(calls.contains(&StoreCall::Sign {
        key: "video/final_cut.mp4".to_string(),
        expire_secs: 48 * 3600,
    }));
}

#[tokio::test]
async fn test_video_encode_failure_aborts_call() {
    let store = RecordingStore::new();
    let encoder = FakeEncoder::new();
    let tokens = SeqTokens::new();
    let uploader = Uploader::new(&store, &encoder, &tokens);

    let result = uploader
        .upload_video(
            &BrokenVideo,
            &credentials(),
            &VideoUploadRequest::default(),
            &UploadPolicy::default(),
        )
        .await;

    assert!(result.is_err());
    // 编码失败发生在任何存储调用之前
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_node_execute_blocks_on_bad_endpoint() {
    // 端点不在白名单：execute 在任何编码/网络调用前返回校验错误文案
    let node = get_node("OSSAdvancedUploadNode").unwrap();
    let params = json!({
        "access_key_id": "ak",
        "access_key_secret": "sk",
        "bucket_name": "demo-bucket",
        "endpoint": "oss-cn-invalid.aliyuncs.com"
    });

    assert!(node.validate(&params).is_err());

    let outputs = node.execute(MediaInput::Images(frames(1)), &params).await;
    assert_eq!(outputs.len(), 1);
    match &outputs[0] {
        OutputValue::Text(text) => {
            assert!(text.contains("oss-cn-invalid.aliyuncs.com"));
        }
        other => panic!("意外的输出: {:?}", other),
    }
}

#[tokio::test]
async fn test_node_execute_rejects_wrong_media() {
    let node = get_node("OSSVideoUploadNode").unwrap();
    let params = json!({
        "access_key_id": "ak",
        "access_key_secret": "sk",
        "bucket_name": "demo-bucket",
        "endpoint": "oss-cn-hangzhou.aliyuncs.com"
    });

    let outputs = node.execute(MediaInput::Images(frames(1)), &params).await;
    match &outputs[0] {
        OutputValue::Text(text) => assert!(text.contains("输入必须是视频")),
        other => panic!("意外的输出: {:?}", other),
    }
}
