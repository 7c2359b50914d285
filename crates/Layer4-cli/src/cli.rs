//! 서브커맨드 구현
//!
//! 조회 실패(알 수 없는 서비스, 잘못된 username)는 에러로 반환되어
//! 프로세스가 0이 아닌 코드로 종료됩니다.

use anyhow::anyhow;
use proofreg_core::{ProofServices, RefreshOutcome};
use proofreg_foundation::ServiceType;
use std::sync::Arc;

/// 모든 키 출력 (정렬)
pub async fn list(services: &ProofServices) -> anyhow::Result<()> {
    let mut keys = services.list_proof_checkers().await;
    keys.sort();

    for key in &keys {
        println!("{}", key);
    }
    tracing::info!("{} proof checkers", keys.len());
    Ok(())
}

/// 서비스 하나 출력
pub async fn lookup(services: &ProofServices, name: &str) -> anyhow::Result<()> {
    let service = find(services, name).await?;

    println!("{:<14} {}", "Key:", service.key());
    println!("{:<14} {}", "Name:", service.display_name());
    println!("{:<14} {}", "Keys:", service.all_string_keys().join(", "));
    if service.is_devel_only() {
        println!("{:<14} yes", "Devel only:");
    }
    Ok(())
}

/// username 정규화 결과 출력
pub async fn check(services: &ProofServices, name: &str, username: &str) -> anyhow::Result<()> {
    let service = find(services, name).await?;
    let normalized = service.normalize_username(username)?;

    println!("✓ {} is a valid {} username", normalized, service.display_name());
    if let Some(url) = service.profile_url(&normalized) {
        println!("  {}", url);
    }
    Ok(())
}

/// refresh 1회 수행 후 결과 출력
pub async fn refresh(services: &ProofServices) -> anyhow::Result<()> {
    let report = services.refresh().await;

    println!("{}", report.outcome);
    if let Some(hash) = &report.entry_hash {
        println!("  entry:   {}", hash);
    }
    println!("  elapsed: {}ms", report.elapsed.as_millis());

    match &report.outcome {
        RefreshOutcome::Merged { rejected, .. } => {
            for record in rejected {
                println!("  ✗ [{}] {}: {}", record.index, record.display_name, record.reason);
            }
        }
        RefreshOutcome::Disabled => {
            println!("  Use --devel or --feature admin to enable remote param proofs.");
        }
        RefreshOutcome::FetchFailed(_) | RefreshOutcome::DecodeFailed(_) => {}
    }

    let stats = services.stats().await;
    println!("  keys:    {}", stats.keys);
    Ok(())
}

async fn find(services: &ProofServices, name: &str) -> anyhow::Result<Arc<dyn ServiceType>> {
    match services.get_service_type(name).await {
        Some(service) => Ok(service),
        None => {
            let mut known = services.list_proof_checkers().await;
            known.sort();
            Err(anyhow!("unknown service '{}' (known: {})", name, known.join(", ")))
        }
    }
}
