use pageknock::domain::entities::{DomainStructure, PageStructure, RecentComment};
use pageknock::domain::repositories::{
    DomainStructureRepository, PageStructureRepository, RecentCommentRepository,
};
use pageknock::error::AppError;
use pageknock::infrastructure::persistence::{
    PgDomainStructureRepository, PgPageStructureRepository, PgRecentCommentRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

const DOMAIN: &str = "https://x.com";

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_page_put_is_insert_if_absent(pool: PgPool) {
    let repo = PgPageStructureRepository::new(Arc::new(pool));
    let page = PageStructure::first(DOMAIN.to_string(), format!("{DOMAIN}/a"), 10);

    assert!(!repo.exists(DOMAIN, &page.url).await.unwrap());
    assert!(repo.put(page.clone()).await.unwrap());
    assert!(!repo.put(page.clone()).await.unwrap());
    assert!(repo.exists(DOMAIN, &page.url).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_page_increment(pool: PgPool) {
    let repo = PgPageStructureRepository::new(Arc::new(pool));
    let url = format!("{DOMAIN}/a");

    repo.put(PageStructure::first(DOMAIN.to_string(), url.clone(), 50))
        .await
        .unwrap();
    repo.increment(DOMAIN, &url, 40).await.unwrap();
    repo.increment(DOMAIN, &url, 60).await.unwrap();

    let pages = repo.list_by_domain(DOMAIN).await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].comment_count, 3);
    assert_eq!(pages[0].latest_unix_time, 60);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_increment_missing_row_is_not_found(pool: PgPool) {
    let pool = Arc::new(pool);
    let pages = PgPageStructureRepository::new(pool.clone());
    let domains = PgDomainStructureRepository::new(pool);

    let result = pages.increment(DOMAIN, "https://x.com/none", 1).await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));

    let result = domains.increment(DOMAIN, true, 1).await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_domain_increment_and_list(pool: PgPool) {
    let repo = PgDomainStructureRepository::new(Arc::new(pool));

    assert!(
        repo.put(DomainStructure::first(DOMAIN.to_string(), 1))
            .await
            .unwrap()
    );
    assert!(
        !repo
            .put(DomainStructure::first(DOMAIN.to_string(), 1))
            .await
            .unwrap()
    );
    repo.increment(DOMAIN, false, 2).await.unwrap();
    repo.increment(DOMAIN, true, 3).await.unwrap();
    repo.put(DomainStructure::first("https://y.com".to_string(), 2))
        .await
        .unwrap();

    let domains = repo.list_all().await.unwrap();
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].site_domain, DOMAIN);
    assert_eq!(domains[0].url_count, 2);
    assert_eq!(domains[0].comment_count, 3);
    assert_eq!(domains[0].latest_unix_time, 3);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_rebuild_from_domain_index(pool: PgPool) {
    let pool = Arc::new(pool);
    let recent = PgRecentCommentRepository::new(pool.clone());
    let pages = PgPageStructureRepository::new(pool.clone());
    let domains = PgDomainStructureRepository::new(pool);

    for (url, id, t) in [("/a", "c1", 1), ("/a", "c2", 5), ("/b", "c3", 3)] {
        recent
            .put_domain(RecentComment {
                site_domain: DOMAIN.to_string(),
                unix_time: t,
                comment: "hi".to_string(),
                comment_id: id.to_string(),
                url: format!("{DOMAIN}{url}"),
                user_id: "1".to_string(),
            })
            .await
            .unwrap();
    }
    domains
        .put(DomainStructure {
            site_domain: DOMAIN.to_string(),
            url_count: 99,
            comment_count: 99,
            latest_unix_time: 0,
        })
        .await
        .unwrap();

    let summary = domains.rebuild().await.unwrap();
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.domains, 1);

    let all = domains.list_all().await.unwrap();
    assert_eq!(all[0].url_count, 2);
    assert_eq!(all[0].comment_count, 3);
    assert_eq!(all[0].latest_unix_time, 5);

    let listed = pages.list_by_domain(DOMAIN).await.unwrap();
    let a = listed.iter().find(|p| p.url.ends_with("/a")).unwrap();
    assert_eq!(a.comment_count, 2);
}
