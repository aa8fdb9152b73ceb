use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::party::{Client, ClientDto, Employee, EmployeeDto},
};

/// Employee store. Document numbers are unique across all employees.
pub struct EmployeeStore {
    pool: DbPool,
}

impl EmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>> {
        let employees =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY last_name, first_name")
                .fetch_all(&self.pool)
                .await?;

        Ok(employees)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Employee> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(employee)
    }

    pub async fn create(&self, dto: EmployeeDto) -> Result<Employee> {
        let mut tx = self.pool.begin().await?;
        check_unique_document(&mut tx, "employees", dto.document_number, None).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO employees
                (first_name, last_name, document_number, hired_on,
                 address_id, branch_id, document_type_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.document_number)
        .bind(dto.hired_on)
        .bind(dto.address_id)
        .bind(dto.branch_id)
        .bind(dto.document_type_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: EmployeeDto) -> Result<Employee> {
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_document(&mut tx, "employees", dto.document_number, Some(id)).await?;

        sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, document_number = ?, hired_on = ?,
                address_id = ?, branch_id = ?, document_type_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(dto.document_number)
        .bind(dto.hired_on)
        .bind(dto.address_id)
        .bind(dto.branch_id)
        .bind(dto.document_type_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Client store
pub struct ClientStore {
    pool: DbPool,
}

impl ClientStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Client>> {
        let clients =
            sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY last_name, first_name")
                .fetch_all(&self.pool)
                .await?;

        Ok(clients)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(client)
    }

    pub async fn create(&self, dto: ClientDto) -> Result<Client> {
        let mut tx = self.pool.begin().await?;
        check_unique_document(&mut tx, "clients", dto.document_number, None).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO clients
                (first_name, last_name, phone, document_number,
                 document_type_id, address_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.phone)
        .bind(dto.document_number)
        .bind(dto.document_type_id)
        .bind(dto.address_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: ClientDto) -> Result<Client> {
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_document(&mut tx, "clients", dto.document_number, Some(id)).await?;

        sqlx::query(
            r#"
            UPDATE clients
            SET first_name = ?, last_name = ?, phone = ?, document_number = ?,
                document_type_id = ?, address_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.phone)
        .bind(dto.document_number)
        .bind(dto.document_type_id)
        .bind(dto.address_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

async fn check_unique_document(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    table: &str,
    document_number: i64,
    exclude_id: Option<i64>,
) -> Result<()> {
    let query = format!(
        "SELECT id FROM {table} WHERE document_number = ? AND id != COALESCE(?, -1)"
    );
    let existing = sqlx::query_scalar::<_, i64>(&query)
        .bind(document_number)
        .bind(exclude_id)
        .fetch_optional(&mut **tx)
        .await?;

    if existing.is_some() {
        return Err(AppError::validation(
            "document_number",
            "a record with this document number already exists",
        ));
    }
    Ok(())
}
