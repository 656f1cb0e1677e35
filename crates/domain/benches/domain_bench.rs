use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Invoice, InvoiceService, KeyGenerator, Money, RandomKeyGenerator};
use invoice_store::InMemoryInvoiceRepository;

const ISSUER: &str = "12345678901234";
const RECIPIENT: &str = "98765432109876";

fn bench_generate_key(c: &mut Criterion) {
    c.bench_function("domain/generate_key", |b| {
        b.iter(|| RandomKeyGenerator.generate_key());
    });
}

fn bench_create_invoice(c: &mut Criterion) {
    c.bench_function("domain/create_invoice", |b| {
        b.iter(|| Invoice::create(ISSUER, RECIPIENT, Money::from_cents(10000)).unwrap());
    });
}

fn bench_issue(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = InvoiceService::new(InMemoryInvoiceRepository::new());

    c.bench_function("domain/issue", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .issue(ISSUER, RECIPIENT, Money::from_cents(10000))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_issue_and_cancel(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/issue_find_cancel", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = InvoiceService::new(InMemoryInvoiceRepository::new());
                let invoice = service
                    .issue(ISSUER, RECIPIENT, Money::from_cents(10000))
                    .await
                    .unwrap();
                service.find_by_key(invoice.key()).await.unwrap();
                service.cancel(invoice.key()).await.unwrap();
            });
        });
    });
}

fn bench_list_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = InvoiceService::new(InMemoryInvoiceRepository::new());

    rt.block_on(async {
        for cents in 1..=1000 {
            service
                .issue(ISSUER, RECIPIENT, Money::from_cents(cents))
                .await
                .unwrap();
        }
    });

    c.bench_function("domain/list_1000_invoices", |b| {
        b.iter(|| rt.block_on(async { service.list().await.unwrap() }));
    });
}

criterion_group!(
    benches,
    bench_generate_key,
    bench_create_invoice,
    bench_issue,
    bench_issue_and_cancel,
    bench_list_1000,
);
criterion_main!(benches);
