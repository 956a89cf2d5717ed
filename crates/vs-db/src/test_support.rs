//! Shared test utilities for vs-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use crate::AnnotationDb;
    use crate::service::SummaryService;

    pub const SCHEMA: &str = include_str!("../fixtures/annotations_schema.sql");

    /// In-memory database with the annotation schema and no rows.
    pub async fn test_db() -> AnnotationDb {
        let db = AnnotationDb::open_local(":memory:").await.unwrap();
        db.conn().execute_batch(SCHEMA).await.unwrap();
        db
    }

    /// In-memory database with a small set of annotations:
    ///
    /// | concept          | images (distinct) | quality | observations |
    /// |------------------|-------------------|---------|--------------|
    /// | Aegina           | 2                 | 1       | 2            |
    /// | Aegina citrea    | 1                 | 1       | 1            |
    /// | Aeginura         | 1                 | 0       | 1            |
    /// | Nanomia bijuga   | 0 (NULL image)    | 0       | 1            |
    pub async fn seeded_db() -> AnnotationDb {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO Annotations (ObservationID_FK, ConceptName, Image) VALUES
                    (1, 'Aegina', 'http://images/1.png'),
                    (1, 'Aegina', 'http://images/1.png'),
                    (2, 'Aegina', 'http://images/2.png'),
                    (3, 'Aegina citrea', 'http://images/3.png'),
                    (4, 'Aeginura', 'http://images/4.png'),
                    (5, 'Nanomia bijuga', NULL);
                 INSERT INTO QualityImageAnnotations (ObservationID_FK, ConceptName, ImageReference) VALUES
                    (1, 'Aegina', 'http://images/1.png'),
                    (3, 'Aegina citrea', 'http://images/3.png'),
                    (4, 'Aeginura', NULL);",
            )
            .await
            .unwrap();
        db
    }

    pub async fn seeded_service() -> SummaryService {
        SummaryService::from_db(seeded_db().await)
    }
}
